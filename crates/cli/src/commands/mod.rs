pub mod put;
pub mod run;
pub mod show;
