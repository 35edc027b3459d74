pub mod control_center;
pub mod output_file;
pub mod states;
pub mod transfer;
pub mod worker;
