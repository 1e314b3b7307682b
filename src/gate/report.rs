//! Plain-text reports over a gate configuration.
//!
//! One tab-separated line per entry, e.g. `connector.session	false`.

use std::io::{self, Write};

use crate::gate::evaluator::LogGate;
use crate::gate::table::flatten;
use crate::gate::tree::ConfigTree;

/// Write every flattened `path<TAB>bool` pair in traversal order.
pub fn write_table<W: Write>(tree: &ConfigTree, out: &mut W) -> io::Result<()> {
    for (path, enabled) in flatten(tree) {
        writeln!(out, "{path}\t{enabled}")?;
    }
    Ok(())
}

/// Write `category<TAB>enabled|disabled` for each dotted category.
pub fn write_verdicts<W, I, S>(gate: &LogGate, categories: I, out: &mut W) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for category in categories {
        let category = category.as_ref();
        let verdict = if gate.enabled_dotted(category) {
            "enabled"
        } else {
            "disabled"
        };
        writeln!(out, "{category}\t{verdict}")?;
    }
    Ok(())
}
