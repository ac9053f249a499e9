pub mod devfiles;
pub mod info;
pub mod process;
