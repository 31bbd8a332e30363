use clap::Parser;

/// This is a TOPSIS ranking program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the decision matrix, in CSV or Excel format. The first
    /// column holds the labels of the alternatives, every other column is a numeric criterion.
    /// The first row is the header.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (list of comma-separated positive numbers) The weight of each criterion column, in column
    /// order. For example: 1,1,1,2
    #[clap(short, long, value_parser)]
    pub weights: Option<String>,

    /// (list of comma-separated '+' or '-') The preference direction of each criterion column, in
    /// column order. '+' means higher is better, '-' means lower is better. For example: -,+,+,+
    #[clap(short = 'm', long, value_parser)]
    pub impacts: Option<String>,

    /// (file path, 'stdout' or empty) Where the ranked table will be written. A '.json' extension
    /// selects the JSON records output, anything else is CSV. Defaults to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default csv) The type of the input: csv or excel. If not specified, it is guessed from
    /// the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path) A reference file containing an expected output. If provided, topsisrank will
    /// check that the produced table matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (email address) If specified, the ranked table will also be delivered to this address.
    /// Delivery failures are reported but do not fail the run.
    #[clap(long, value_parser)]
    pub email: Option<String>,

    /// (address:port) If specified, runs the HTTP scoring service on this address instead of
    /// scoring a file.
    #[clap(long, value_parser)]
    pub serve: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
