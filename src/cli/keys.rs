//! Keys command.
//!
//! Lists the lookup keys probed for each category under the resolved prefix.

use crate::cli::{output, PrefixArgs};
use crate::core::category::Category;
use crate::core::config::resolve_prefix;
use crate::error::Result;

/// Print candidate keys per category.
pub fn execute(args: &PrefixArgs, json: bool) -> Result<()> {
    let prefix = resolve_prefix(args.prefix.as_deref(), args.pipeline_slug.as_deref())?;

    if json {
        let categories: Vec<_> = Category::ALL
            .iter()
            .map(|c| {
                serde_json::json!({
                    "category": c,
                    "keys": c.keys(&prefix),
                })
            })
            .collect();
        let out = serde_json::json!({ "prefix": prefix, "categories": categories });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (i, category) in Category::ALL.iter().enumerate() {
        if i > 0 {
            println!();
        }
        output::header(category.label());
        for key in category.keys(&prefix) {
            output::list_item(&key);
        }
    }
    Ok(())
}
