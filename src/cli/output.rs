//! CLI output formatting utilities

use colored::Colorize;

use crate::models::Exec;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a newly stored exec account
pub fn print_exec(exec: &Exec) {
    println!("{}", "Exec Account".bold().underline());
    println!();
    println!("  {} {}", "ID:".bold(), exec.id);
    println!("  {} {}", "Username:".bold(), exec.username);
    println!("  {} {} {}", "Name:".bold(), exec.first_name, exec.last_name);
    println!("  {} {}", "Email:".bold(), exec.email);
    println!("  {} {}", "Role:".bold(), exec.role.cyan());

    if let Some(created) = exec.user_created_at {
        println!(
            "  {} {}",
            "Created:".bold(),
            created.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}
