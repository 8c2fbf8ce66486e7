pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|row| strings(row)).collect()
}

pub const WEATHER_FEATURE_NAMES: [&str; 4] = ["outlook", "temperature", "humidity", "windy"];

/// The classic 14-row play-tennis table: (outlook, temperature, humidity, windy) -> play.
pub fn weather() -> (Vec<Vec<String>>, Vec<String>) {
    let features = table(&[
        &["sunny", "hot", "high", "false"],
        &["sunny", "hot", "high", "true"],
        &["overcast", "hot", "high", "false"],
        &["rainy", "mild", "high", "false"],
        &["rainy", "cool", "normal", "false"],
        &["rainy", "cool", "normal", "true"],
        &["overcast", "cool", "normal", "true"],
        &["sunny", "mild", "high", "false"],
        &["sunny", "cool", "normal", "false"],
        &["rainy", "mild", "normal", "false"],
        &["sunny", "mild", "normal", "true"],
        &["overcast", "mild", "high", "true"],
        &["overcast", "hot", "normal", "false"],
        &["rainy", "mild", "high", "true"],
    ]);
    let labels = strings(&[
        "no", "no", "yes", "yes", "yes", "no", "yes", "no", "yes", "yes", "yes", "yes", "yes",
        "no",
    ]);
    (features, labels)
}

/// Headered CSV form of [`weather`] with the label in the last column.
pub const WEATHER_CSV: &str = "\
outlook,temperature,humidity,windy,play
sunny,hot,high,false,no
sunny,hot,high,true,no
overcast,hot,high,false,yes
rainy,mild,high,false,yes
rainy,cool,normal,false,yes
rainy,cool,normal,true,no
overcast,cool,normal,true,yes
sunny,mild,high,false,no
sunny,cool,normal,false,yes
rainy,mild,normal,false,yes
sunny,mild,normal,true,yes
overcast,mild,high,true,yes
overcast,hot,normal,false,yes
rainy,mild,high,true,no
";
