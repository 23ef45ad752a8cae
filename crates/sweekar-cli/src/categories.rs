//! `categories` command: print the category table.

use std::path::Path;

use sweekar_core::CategoryTable;

pub(crate) fn load_table(path: Option<&Path>) -> anyhow::Result<CategoryTable> {
    let table = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading category overrides");
            CategoryTable::builtin_with_overrides(path)?
        }
        None => CategoryTable::builtin(),
    };
    Ok(table)
}

/// Prints every category with its keywords and acceptable place types.
///
/// # Errors
///
/// Returns an error if the override file cannot be read or parsed.
pub(crate) fn run_categories(path: Option<&Path>) -> anyhow::Result<()> {
    let table = load_table(path)?;
    println!("{} categories", table.len());
    for key in table.keys() {
        let profile = table.lookup(Some(key));
        let types = if profile.acceptable_types.is_empty() {
            "any".to_string()
        } else {
            profile.acceptable_types.join(", ")
        };
        println!("\n{key}");
        println!("  keywords: {}", profile.keywords.join("; "));
        println!("  types:    {types}");
    }
    Ok(())
}
