#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::{run_source, Interpreter, LoxError};

/// Cloneable sink so a test can read back what `print` wrote.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An interpreter wired to a fresh buffer.
pub fn interpreter() -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    (interpreter, buffer)
}

/// Run a whole program, returning its output and the pipeline outcome.
pub fn run(source: &str) -> (String, Result<(), Vec<LoxError>>) {
    let (mut interpreter, buffer) = interpreter();
    let result = run_source(&mut interpreter, source);
    (buffer.contents(), result)
}

/// Run a program that must succeed and return its output.
pub fn output_of(source: &str) -> String {
    let (output, result) = run(source);
    if let Err(errors) = result {
        let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        panic!("program failed: {:?}\noutput so far:\n{}", rendered, output);
    }
    output
}

/// Run a program that must fail and return the rendered errors.
pub fn errors_of(source: &str) -> Vec<String> {
    match run(source).1 {
        Ok(()) => panic!("expected program to fail:\n{}", source),
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    }
}
