// lib.rs
pub mod assignment;
pub mod commands;
pub mod external;
pub mod gfa;
pub mod io;
pub mod paf;
pub mod positions;
