/*!
# Getting Started

A device runs one script, `main.bas`, from its file store. It starts
the script at boot and runs it statement by statement. When the script
ends, or when no script is stored, the device sits idle. It never exits.
It is always listening for the CMD mode escape, so a new script can be
uploaded over the serial line.

On a workstation the `basic` binary plays the device. The terminal is
the serial line and a directory is the file store.

```text
$ mkdir storage
$ printf 'for i = 1 to 3\nprint "hello ", i\nnext i\n' > storage/main.bas
$ basic --storage storage
hello 1
hello 2
hello 3
```

Press Ctrl-C and then any other key to enter CMD mode. The device
answers with a banner and waits for commands. Ctrl-D closes the line
and stops the host binary.

```text
+OK BASIC CMD Mode
ls
/
main.bas
+OK
exit
+OK
```

A script that hits a fatal error stops for good and the device is
held. It prints the error again now and then so whoever is watching
the line knows why nothing is happening.

```text
?UNDEFINED LINE IN 4; LABEL loop NOT FOUND
```

The held state still answers the escape. Upload a fixed script and
the device reboots into it.

*/
