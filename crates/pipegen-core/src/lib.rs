//! Core engine for generating nmrPipe processing scripts from Varian
//! parameter files: procpar parsing, experiment classification,
//! chemical-shift referencing, phase carry-forward, and script composition.

pub mod compose;
pub mod domain;
pub mod experiment;
pub mod phase;
pub mod procpar;
pub mod referencing;
