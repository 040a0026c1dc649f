/// Dataset indexes for the command line
pub mod datasets;
