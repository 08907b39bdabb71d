// Configuration inputs for the command line: variable files and test suites

pub mod suite;
pub mod variables;
