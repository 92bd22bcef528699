// Splits raw arguments into own options and forwarded downloader arguments.
//
// Recognised own options: --parent-file-id, --drive-id (both also in
// `--opt=value` form), -h and --help. Everything else keeps its original
// order. A bare `--` stops recognition and is not forwarded itself.

const VALUE_OPTIONS: [&str; 2] = ["--parent-file-id", "--drive-id"];
const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

#[derive(Debug, Default, PartialEq)]
pub struct SplitArgs {
    pub own: Vec<String>,
    pub forwarded: Vec<String>,
}

pub fn split_arguments<I>(args: I) -> SplitArgs
where
    I: IntoIterator<Item = String>,
{
    let mut split = SplitArgs::default();
    let mut tokens = args.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if token == "--" {
            split.forwarded.extend(tokens.by_ref());
            break;
        }

        if HELP_FLAGS.contains(&token.as_str()) || is_inline_value(&token) {
            split.own.push(token);
            continue;
        }

        if VALUE_OPTIONS.contains(&token.as_str()) {
            split.own.push(token);
            // A flag-looking value is left for clap to reject as missing
            if let Some(value) = tokens.next_if(|next| !next.starts_with('-')) {
                split.own.push(value);
            }
            continue;
        }

        split.forwarded.push(token);
    }

    split
}

fn is_inline_value(token: &str) -> bool {
    token
        .split_once('=')
        .is_some_and(|(name, _)| VALUE_OPTIONS.contains(&name))
}
