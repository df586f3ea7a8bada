use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Render output as tables. Scalar result fields go in a Field/Value
/// table; arrays of records (the yearly schedule) get a table of their own.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if is_report(map) => print_report(map),
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn is_report(map: &Map<String, Value>) -> bool {
    map.contains_key("columns") && map.contains_key("rows")
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&String, &Vec<Value>)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                nested.push((key, items));
            }
            _ => builder.push_record([key.as_str(), &format_value(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, items) in nested {
        println!("\n{}:", key);
        print_array_table(items);
    }
}

fn print_report(map: &Map<String, Value>) {
    if let Some(Value::String(title)) = map.get("title") {
        println!("{}", title);
    }
    if let Some(Value::String(generated)) = map.get("generated_on") {
        println!("Generated {}", generated);
    }

    if let Some(Value::Array(summary)) = map.get("summary") {
        let mut builder = Builder::default();
        for line in summary {
            let label = line.get("label").map(format_value).unwrap_or_default();
            let value = line.get("value").map(format_value).unwrap_or_default();
            builder.push_record([label, value]);
        }
        println!("{}", Table::from(builder));
    }

    let mut builder = Builder::default();
    if let Some(Value::Array(columns)) = map.get("columns") {
        builder.push_record(columns.iter().map(format_value));
    }
    if let Some(Value::Array(rows)) = map.get("rows") {
        for row in rows {
            if let Value::Array(cells) = row {
                builder.push_record(cells.iter().map(format_value));
            }
        }
    }
    println!("\n{}", Table::from(builder));

    if let Some(Value::Array(notes)) = map.get("notes") {
        if !notes.is_empty() {
            println!("\nNotes:");
            for n in notes {
                println!("  - {}", format_value(n));
            }
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
