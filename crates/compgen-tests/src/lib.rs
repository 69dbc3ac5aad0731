//! Codecs generated from the fixture bundles at build time and compiled
//! against the runtime crate.

include!(concat!(env!("OUT_DIR"), "/standard_library.rs"));
include!(concat!(env!("OUT_DIR"), "/game.rs"));
include!(concat!(env!("OUT_DIR"), "/shapes.rs"));

#[cfg(test)]
mod test;
