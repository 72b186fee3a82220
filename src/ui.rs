//! Terminal output for the command line.
//!
//! Formatting helpers return plain strings so they can be tested; the
//! `display_*` functions print them with colors.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::descriptor::BuildDescriptor;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Warnings go to stderr so that stdout stays usable by build scripts.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Plain-text summary of a variant's descriptor.
///
/// # Arguments
/// * `variant` - The build variant described
/// * `descriptor` - Its resolved versions
pub fn format_descriptor(variant: &str, descriptor: &BuildDescriptor) -> String {
    let mut lines = vec![format!("Variant: {}", variant)];

    lines.push(format!(
        "  Version code: {}",
        descriptor
            .version_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    lines.push(format!(
        "  Version name: {}",
        descriptor.version_name.as_deref().unwrap_or("-")
    ));

    if let Some(build) = &descriptor.build {
        lines.push(format!("  Tag:          {}", build.name));
        lines.push(format!("  Commit:       {}", build.commit_sha));
        lines.push(format!("  Build:        {} #{}", build.build_version, build.build_number));
    }

    lines.join("\n")
}

/// Print the descriptor of a variant with a bold heading.
pub fn display_descriptor(variant: &str, descriptor: &BuildDescriptor) {
    let text = format_descriptor(variant, descriptor);
    let mut lines = text.lines();
    if let Some(heading) = lines.next() {
        println!("\n{}", style(heading).bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// Display the variants configured in the configuration file.
pub fn display_available_variants(variants: &[String]) {
    println!("{}", style("Configured variants:").bold());
    for variant in variants {
        println!("  - {}", variant);
    }
}
