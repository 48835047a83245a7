use console::Term;

/// Narrowest terminal that gets the full logo.
pub const MIN_LOGO_WIDTH: usize = 80;

const LOGO: &str = r"
     .-~~~-.
 .-~~       ~-.          _             _
(   .-~~~~-.   )    ___ | |_  _ __ __ _| |_ _   _ ___
 ~-(        )-~    / __|| __|| '__/ _` | __| | | / __|
    ~-.__.-~       \__ \| |_ | | | (_| | |_| |_| \__ \
   ~~~~~~~~~~~     |___/ \__||_|  \__,_|\__|\__,_|___/
";

/// Left-pad every line so the block sits in the middle of `width` columns.
pub fn center(block: &str, width: usize) -> String {
    let widest = block.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let pad = " ".repeat(width.saturating_sub(widest) / 2);

    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The greeting shown before the first question.
pub fn welcome(width: usize) -> String {
    if width >= MIN_LOGO_WIDTH {
        format!("{}\n{}\n", center(LOGO, width), "-".repeat(width))
    } else {
        "Welcome to the Stratus CLI\n".to_string()
    }
}

pub fn print_welcome() {
    let (_, columns) = Term::stdout().size();
    println!("{}", welcome(usize::from(columns)));
}
