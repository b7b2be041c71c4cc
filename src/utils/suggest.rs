fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ':')
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b_chars.len()]
}

/// Closest candidates to `input`, best first.
pub fn suggest(input: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let needle = normalize(input);
    if needle.is_empty() {
        return Vec::new();
    }
    let allowed = (needle.len() / 3).max(1);
    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .filter_map(|candidate| {
            let hay = normalize(candidate);
            let score = if hay == needle {
                0
            } else if hay.contains(&needle) || needle.contains(&hay) {
                1
            } else {
                edit_distance(&needle, &hay)
            };
            (score <= allowed).then_some((score, candidate))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit.max(1))
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
