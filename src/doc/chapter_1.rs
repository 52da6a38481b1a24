/*!
# Expressions and Types

There are three types. Each has 26 variables named by a single
lowercase letter and a decoration.

```text
let a = 5         // Integer, signed 32-bit
let a# = 1.5      // Float, 64-bit
let a$ = "hello"  // String, up to 127 bytes
```

The three `a`s are different variables. Nothing needs declaring and
everything starts out as zero or the empty string. `let` is optional.

There is no type promotion. The type of an expression is decided by
what it is assigned to, or for `print` by its first item. Integer
expressions accept float literals and float variables, truncated
toward zero. String expressions accept numbers and write them out.

```text
a = 7 / 2  // 3
b# = 7.0 / 2.0  // 3.5
c = b#  // 3
s$ = "n=" + a     // "n=3"
```

## Integer operators

Precedence from lowest to highest. Operators on the same row are
evaluated left to right. Arithmetic wraps on overflow.

| Operators     | Meaning                             |
|---------------|-------------------------------------|
| `<` `>` `=`   | Comparison, 1 when true, 0 when not |
| `+` `-` `&` `\|` | Add, subtract, bitwise and, or   |
| `*` `/` `%`   | Multiply, divide, remainder         |
| `-`           | Negation                            |

Dividing by zero is fatal. Comparison only happens in `if`.

## Float operators

`+ - * /` and negation. Floats follow IEEE rules, so dividing by
zero gives infinity rather than an error.

## String operators

`+` concatenates. The result must fit in 127 bytes.

## Functions

| Function        | Type    | Returns                                    |
|-----------------|---------|--------------------------------------------|
| `randint()`     | Integer | Next pseudo-random integer, never negative |
| `not(x)`        | Integer | 1 if x is 0, otherwise 0                   |
| `zero()`        | Integer | 0                                          |
| `time()`        | Integer | Seconds since the Unix epoch               |
| `rnd()`         | Float   | Pseudo-random number from 0 to 1           |
| `abs(x#)`       | Float   | Absolute value                             |
| `atn(x#)` `cos(x#)` `sin(x#)` `tan(x#)` | Float | Trigonometry in radians |
| `exp(x#)` `log(x#)` | Float | Natural exponent and logarithm         |
| `sqr(x#)`       | Float   | Square root                                |
| `len(x$)`       | String  | Byte length of x written as a number       |

The generator behind `randint` and `rnd` starts from the same seed
every time a script starts. Use `randomize` to change that.

*/
