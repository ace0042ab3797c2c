//! Input prompting for `project create` and `project link`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use sygkro_core::{Inputs, TemplateConfig};

/// Collect a value for every input the template declares, in sorted key
/// order. An empty line accepts the default; `quiet` accepts every default
/// without prompting.
pub fn collect_inputs<R: BufRead, W: Write>(
    config: &TemplateConfig,
    quiet: bool,
    reader: &mut R,
    out: &mut W,
) -> Result<Inputs> {
    let mut inputs = Inputs::new();

    if quiet {
        for (key, default) in &config.templating.inputs {
            inputs.insert(key.clone(), default.clone());
        }
        return Ok(inputs);
    }

    writeln!(out, "Please provide values for the following inputs:")?;
    for (key, default) in &config.templating.inputs {
        write!(out, "{key} (default: {default}): ")?;
        out.flush()?;

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .with_context(|| format!("error reading input for {key}"))?;
        let value = line.trim();
        inputs.insert(
            key.clone(),
            if value.is_empty() {
                default.clone()
            } else {
                value.to_string()
            },
        );
    }

    Ok(inputs)
}
