//! Get command implementation

use anyhow::Result;
use clap::Args;
use confstore::{ConfigStore, Value};

use super::utils::{load_store, LoadArgs};

#[derive(Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Dotted key to look up (e.g. http.port)
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Coerce the value: raw|string|int|bool|float|list|map
    #[arg(long = "as", value_name = "TYPE")]
    pub as_type: Option<String>,

    /// Fail when the key is absent instead of printing the zero value
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Raw,
    String,
    Int,
    Bool,
    Float,
    List,
    Map,
}

pub fn run(args: GetArgs) -> Result<()> {
    let value_type = parse_value_type(args.as_type.as_deref())?;
    let store = load_store(&args.load)?;

    if args.strict && !store.contains(&args.key) {
        anyhow::bail!("Key not found: {}", args.key);
    }

    println!("{}", render(&store, &args.key, value_type));
    Ok(())
}

fn parse_value_type(value: Option<&str>) -> Result<ValueType> {
    match value.unwrap_or("raw").to_ascii_lowercase().as_str() {
        "raw" | "json" => Ok(ValueType::Raw),
        "string" | "str" => Ok(ValueType::String),
        "int" | "integer" => Ok(ValueType::Int),
        "bool" | "boolean" => Ok(ValueType::Bool),
        "float" | "float64" => Ok(ValueType::Float),
        "list" | "string-list" => Ok(ValueType::List),
        "map" | "string-map" => Ok(ValueType::Map),
        invalid => {
            anyhow::bail!("Invalid type '{invalid}'. Use: raw|string|int|bool|float|list|map")
        }
    }
}

fn render(store: &ConfigStore, key: &str, value_type: ValueType) -> String {
    match value_type {
        ValueType::Raw => store.get(key).unwrap_or(&Value::Null).to_string(),
        ValueType::String => store.get_string(key),
        ValueType::Int => store.get_int(key).to_string(),
        ValueType::Bool => store.get_bool(key).to_string(),
        ValueType::Float => store.get_float(key).to_string(),
        ValueType::List => store.get_string_list(key).join("\n"),
        ValueType::Map => Value::Object(store.get_string_map(key)).to_string(),
    }
}
