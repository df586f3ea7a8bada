use serde_json::{Map, Value};
use std::io;

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout. An amortisation result is written as
/// its yearly schedule; a report as its columns and formatted rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let (Some(Value::Array(columns)), Some(Value::Array(rows))) =
                (map.get("columns"), map.get("rows"))
            {
                write_report_csv(&mut wtr, columns, rows);
            } else if let Some(Value::Object(result)) = map.get("result") {
                write_object_csv(&mut wtr, result);
            } else {
                write_object_csv(&mut wtr, map);
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_object_csv(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    if let Some(Value::Array(schedule)) = map.get("schedule") {
        write_array_csv(wtr, schedule);
        return;
    }
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn write_report_csv(wtr: &mut StdoutWriter<'_>, columns: &[Value], rows: &[Value]) {
    let header: Vec<String> = columns.iter().map(format_csv_value).collect();
    let _ = wtr.write_record(&header);
    for row in rows {
        if let Value::Array(cells) = row {
            let record: Vec<String> = cells.iter().map(format_csv_value).collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn write_array_csv(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
