use clap::Parser;
use std::io;
use tigknit::commands::{
    add_sequence::run_add_sequence, add_tig::run_add_tig, extract_fastx::run_extract_fastx,
    filter_reads::run_filter_reads, split_asm::run_split_asm, subgraph::run_subgraph,
};

/// Common options shared between all commands
#[derive(Parser, Debug)]
struct CommonOpts {
    /// Verbosity level (0 = error, 1 = info, 2 = debug)
    #[clap(short, long, default_value = "0")]
    verbose: u8,
}

/// Command-line toolkit for assembly-graph post-processing.
#[derive(Parser, Debug)]
#[command(author, version, about, disable_help_subcommand = true)]
enum Args {
    /// Fill GFA segment lines with sequences from a FASTA
    AddSequence {
        #[clap(flatten)]
        common: CommonOpts,

        /// Path to the graph file
        #[clap(short = 'g', long, value_parser)]
        gfa: String,

        /// Path to the FASTA with the segment sequences (may be compressed)
        #[clap(short = 'r', long, value_parser)]
        reads: String,

        /// Path to write the edited graph
        #[clap(short = 'o', long, value_parser)]
        output: String,
    },
    /// Append read/tig assignment edges and tig stubs to a GFA
    AddTig {
        #[clap(flatten)]
        common: CommonOpts,

        /// Path to the graph file
        #[clap(short = 'g', long, value_parser)]
        gfa: String,

        /// Path to the read/tig assignment CSV (read,tig,tig_len)
        #[clap(short = 'a', long, value_parser)]
        assignment: String,

        /// Path to write the edited graph
        #[clap(short = 'o', long, value_parser)]
        output: String,

        /// Overlap CIGAR placed on the appended links
        #[clap(short = 'O', long, value_parser, default_value = "10M")]
        overlap: String,
    },
    /// Select reads overlapping contig extremities from a PAF
    FilterReads {
        #[clap(flatten)]
        common: CommonOpts,

        /// Path to the reads-to-contigs overlap PAF
        #[clap(short = 'p', long, value_parser)]
        paf: String,

        /// Path to write the selected read names (one per line)
        #[clap(short = 'o', long, value_parser)]
        output: String,

        /// Path to write the tig/read assignment CSV (tig,read)
        #[clap(short = 'a', long, value_parser)]
        assignment: String,

        /// Distance to extremity
        #[clap(short = 'd', long, value_parser)]
        distance: f64,
    },
    /// Extract and render graph neighborhoods around genomic positions
    Subgraph {
        #[clap(flatten)]
        common: CommonOpts,

        /// Path to the position list (header line, then `chrom begin end`)
        #[clap(short = 'p', long, value_parser)]
        positions: String,

        /// Path to the indexed BAM of contigs mapped against the reference
        #[clap(short = 'm', long, value_parser)]
        mapping: String,

        /// Graph path template; '{chrom}' is replaced by the chromosome name
        #[clap(short = 'g', long, value_parser)]
        graph: String,

        /// Traversal distance around nodes
        #[clap(short = 'd', long, value_parser, default_value_t = 5)]
        depth: u32,

        /// Padding applied on both sides of each position
        #[clap(short = 'c', long, value_parser, default_value_t = 1000)]
        position_correction: u64,

        /// Prefix of the generated outputs
        #[clap(short = 'o', long, value_parser)]
        out_prefix: String,
    },
    /// Extract extremity reads' sequences plus assemblies
    ExtractFastx {
        #[clap(flatten)]
        common: CommonOpts,

        /// Path to the reads-to-assembly mapping PAF
        #[clap(short = 'm', long, value_parser)]
        map2asm: String,

        /// Path to the read-to-read overlap PAF
        #[clap(short = 'r', long, value_parser)]
        read2read: String,

        /// Path to the reads FASTQ (may be compressed)
        #[clap(short = 'i', long, value_parser)]
        input: String,

        /// Path to the assemblies FASTA (may be compressed)
        #[clap(short = 'A', long, value_parser)]
        assemblies: String,

        /// Path to write the selected sequences (compression mirrors --input)
        #[clap(short = 'o', long, value_parser)]
        output: String,

        /// Path to write the read/tig assignment CSV (read,tig,tig_len)
        #[clap(short = 'a', long, value_parser)]
        assignment: String,

        /// Max distance to extremity
        #[clap(short = 'd', long, value_parser, default_value_t = 2500)]
        distance: u64,
    },
    /// Split an assembly FASTA into one file per cluster prefix
    SplitAsm {
        #[clap(flatten)]
        common: CommonOpts,

        /// Path to the assembly FASTA (may be compressed)
        #[clap(short = 'a', long, value_parser)]
        assembly: String,

        /// Prefix of the generated files
        #[clap(short = 'p', long, value_parser)]
        prefix: String,
    },
}

/// Initialize logger based on verbosity
fn initialize_logger(common: &CommonOpts) {
    env_logger::Builder::new()
        .filter_level(match common.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    match args {
        Args::AddSequence {
            common,
            gfa,
            reads,
            output,
        } => {
            initialize_logger(&common);
            run_add_sequence(&gfa, &reads, &output)?;
        }
        Args::AddTig {
            common,
            gfa,
            assignment,
            output,
            overlap,
        } => {
            initialize_logger(&common);
            run_add_tig(&gfa, &assignment, &output, &overlap)?;
        }
        Args::FilterReads {
            common,
            paf,
            output,
            assignment,
            distance,
        } => {
            initialize_logger(&common);
            run_filter_reads(&paf, &output, &assignment, distance)?;
        }
        Args::Subgraph {
            common,
            positions,
            mapping,
            graph,
            depth,
            position_correction,
            out_prefix,
        } => {
            initialize_logger(&common);
            run_subgraph(
                &positions,
                &mapping,
                &graph,
                depth,
                position_correction,
                &out_prefix,
            )?;
        }
        Args::ExtractFastx {
            common,
            map2asm,
            read2read,
            input,
            assemblies,
            output,
            assignment,
            distance,
        } => {
            initialize_logger(&common);
            run_extract_fastx(
                &map2asm,
                &read2read,
                &input,
                &assemblies,
                &output,
                &assignment,
                distance,
            )?;
        }
        Args::SplitAsm {
            common,
            assembly,
            prefix,
        } => {
            initialize_logger(&common);
            run_split_asm(&assembly, &prefix)?;
        }
    }

    Ok(())
}
