/*!
# Serial Protocol

## Entering CMD mode

Send byte 3 (Ctrl-C), then any byte within half a second. The device
checks after every statement, on every idle poll and on every poll
while held. A lone 3 is dropped so stray line noise does nothing.

## Lines

A line ends with `\n`, `\r\n`, or a `\r` with no `\n` arriving within
half a second. Any of them can be used, mixed freely.

## Commands

Every reply line starts with `+OK` or `-ERR`. The session opens with
`+OK BASIC CMD Mode`.

| Command                 | Reply                                        |
|-------------------------|----------------------------------------------|
| `ls`                    | Current directory, one line per entry, `+OK` |
| `cd dir`                | `+OK`. `..` and `/` go to the top            |
| `rm name`               | `+OK` or `-ERR rm`                           |
| `upload name size`      | See below                                    |
| `exit`                  | `+OK`, then back to the script. Reboots if anything was uploaded |
| `reboot`                | `+OK`, then the device resets                |

Anything else gets `-ERR` and the command word.

## Uploading

After `upload main.bas 3` and its `+OK`, send exactly 3 lines, each
one byte written in decimal. Each line is answered with `+OK`.

```text
upload main.bas 3
+OK
72
+OK
101
+OK
108
+OK
+OK main.bas 3 dd46b7fb
```

The last reply carries the CRC-32 of the stored bytes in hex. A line
that is not a byte ends the upload with `-ERR` and that line. The file
is only written when every byte has arrived.

*/
