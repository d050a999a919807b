//! `jsptr`: look up a JSON Pointer (RFC 6901) in a document.
//!
//! Usage:
//!   jsptr '<pointer>' < doc.json
//!
//! The document is read from stdin. The pointer is the first argument. Set
//! `RUST_LOG=trace` to see how the pointer is resolved.

use jsptr::Pointer;
use serde_json::Value;
use std::io::{self, Read, Write};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let pointer = match args.get(1).map(Pointer::new) {
        Some(Ok(p)) => p,
        Some(Err(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        None => {
            eprintln!("First argument must be a JSON Pointer.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let mut found = Value::Null;
    if let Err(e) = pointer.retrieve(&mut found, buf.trim()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let rendered = match serde_json::to_string_pretty(&found) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{rendered}") {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
