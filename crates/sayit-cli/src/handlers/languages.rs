//! `sayit languages` - list the selectable languages.

use sayit_core::LANGUAGES;

pub fn run() {
    println!("auto   Auto-detect (default)");
    for (code, name) in LANGUAGES {
        println!("{code:<6} {name}");
    }
}
