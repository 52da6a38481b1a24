/*!
# Statements

One statement per line. A line is ended by a newline. Carriage
returns are ignored, so files with either line ending work. `rem` or
`//` starts a comment that runs to the end of the line. A line that is
only a comment does not count as a line.

Jumps go to labels, not line numbers. A label is a line holding only
a name followed by `:`, up to 15 letters, digits or underscores. A
label name must not begin with a keyword: `top:` is read as `to`.
*/

pub mod END {
    /*!
    ## `end`
    Stops the script. The device goes idle.
    */
}

pub mod FOR {
    /*!
    ## `for i = x to y` ... `next i`
    Counts the integer variable from x up to y by one. The loop body
    runs y-x+1 times, or not at all when x is past y. Loops nest four
    deep.
    ```text
    for i = 1 to 3
    print i
    next i
    ```
    */
}

pub mod GOSUB {
    /*!
    ## `gosub label:` ... `return`
    Calls a subroutine. `return` continues on the line after the
    `gosub`. Calls nest ten deep. An eleventh is fatal.
    ```text
    gosub greet:
    end
    greet:
    print "hello"
    return
    ```
    */
}

pub mod GOTO {
    /*!
    ## `goto label:`
    Continues at the label. Labels further down the script are found
    even before that part of the script has ever run.
    */
}

pub mod IF {
    /*!
    ## `if x then statement [else statement]`
    Runs the first statement when x is not zero, the second one when
    it is. Each branch is a single statement.
    ```text
    if a > 10 then print "big" else print "small"
    ```
    */
}

pub mod LET {
    /*!
    ## `[let] variable = expression`
    Assigns a value. The variable's decoration picks the type of the
    expression.
    */
}

pub mod PRINT {
    /*!
    ## `print item [, item | ; item] ...`
    Prints items followed by a newline. A comma puts a space between
    two items, a semicolon puts nothing.
    ```text
    print "x=", x; "!"
    ```
    */
}

pub mod PUSH {
    /*!
    ## `push x` and `pop [variable]`
    A stack of 256 integers. `pop` without a variable throws the top
    value away. Pushing onto a full stack is fatal, as is popping from
    an empty one.
    */
}

pub mod PEEK {
    /*!
    ## `peek address, variable` and `poke address, value`
    Read and write memory through handlers registered by the firmware.
    Without a handler they are fatal.
    */
}

pub mod RANDOMIZE {
    /*!
    ## `randomize [seed]`
    Seeds the generator. Without a seed it is seeded from the system's
    entropy source.
    */
}

pub mod SLEEP {
    /*!
    ## `sleep seconds` and `delay milliseconds`
    Pauses the script. Nothing else runs, but the line is still
    checked for the CMD mode escape afterwards.
    */
}

pub mod GPIO {
    /*!
    ## `gpioinit pin`, `gpiodirin pin`, `gpiodirout pin`, `gpioon pin`, `gpiooff pin`
    Drive a general purpose pin.
    ```text
    gpioinit 25
    gpiodirout 25
    blink:
    gpioon 25
    delay 250
    gpiooff 25
    delay 250
    goto blink:
    ```
    */
}

pub mod OS {
    /*!
    ## `os command$`
    Runs a shell command and prints what it printed. Only allowed when
    the device was started with `--allow-os`, fatal otherwise.
    */
}
