//! Line diff of a scene file before and after a fix

/// Diff two texts line by line.
///
/// Unchanged lines are prefixed with two spaces, removed lines with `- `
/// and added lines with `+ `. Uses a longest-common-subsequence table,
/// which is fine for scene files of a few hundred lines.
pub fn compute_scene_diff(before: &str, after: &str) -> String {
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();

    // lcs[i][j] = length of the LCS of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut output = String::new();
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            output.push_str(&format!("  {}\n", old[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            output.push_str(&format!("- {}\n", old[i]));
            i += 1;
        } else {
            output.push_str(&format!("+ {}\n", new[j]));
            j += 1;
        }
    }
    for line in &old[i..] {
        output.push_str(&format!("- {}\n", line));
    }
    for line in &new[j..] {
        output.push_str(&format!("+ {}\n", line));
    }

    output
}

/// True if the diff contains any added or removed line
pub fn has_changes(diff: &str) -> bool {
    diff.lines().any(|l| l.starts_with("- ") || l.starts_with("+ "))
}
