use msgwire::message::FormatRegistry;

use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_names, OutputFormat};

pub fn run(registry: &FormatRegistry, output: OutputFormat) -> CliResult<i32> {
    print_names(&registry.names(), output);
    Ok(SUCCESS)
}
