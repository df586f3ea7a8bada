use serde_json::Value;

/// Fields printed by `--output minimal`, first non-null match wins.
const PRIORITY_KEYS: [&str; 5] = [
    "periodic_payment",
    "max_home_price",
    "max_loan_amount",
    "file_name",
    "principal",
];

/// Print just the headline figure of a result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(items) = result_obj {
        for item in items {
            println!("{}", format_minimal(item.get("preset").unwrap_or(item)));
        }
        return;
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
