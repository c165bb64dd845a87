pub mod add_sequence;
pub mod add_tig;
pub mod extract_fastx;
pub mod filter_reads;
pub mod split_asm;
pub mod subgraph;
