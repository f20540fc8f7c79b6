use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "yt-transcriber",
    about = "Fetch YouTube transcripts in batch through the Supadata API",
    version,
    long_about = "Reads youtube_url.csv from the working directory, fetches a plain-text \
transcript for every URL that is not yet in the completed or failed ledger, and writes \
one text file per video under the transcripts directory. A fixed pause between requests \
keeps the tool inside the API's rate limits."
)]
pub struct Cli {
    /// Language code for transcripts (e.g. 'en', 'es', 'fr')
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Stray arguments are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,
}
