// Shared output theme: four message classes with fixed colors.
// Documented declaratively in THEME.md.

use colored::Colorize;

/// Print a section header: bright cyan, bold, followed by a rule.
pub fn section(text: &str) {
    println!();
    println!("{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(60));
}

/// Print a success line with a green check mark.
pub fn success(text: &str) {
    println!("{} {}", "✓".bright_green(), text);
}

/// Print an error line with a red cross, to stderr.
pub fn failure(text: &str) {
    eprintln!("{} {}", "✗".bright_red(), text.bright_red());
}

/// Print an informational line with a yellow bullet.
pub fn info(text: &str) {
    println!("{} {}", "•".bright_yellow(), text);
}

/// Echo an external command line, dimmed. Used by the inspect flag.
pub fn command(line: &str) {
    println!("{}", format!("$ {}", line).dimmed());
}
