use std::collections::HashMap;

use super::store::{Chunk, FileScore};

/// Sum re-ranked chunk scores per file and return the best `top_k` files.
///
/// A file matched by several chunks accumulates all of their scores. Files
/// with equal totals keep the order in which they first appear in `ranked`.
pub fn aggregate_by_file(
    chunks: &[Chunk],
    ranked: &[(usize, f32)],
    top_k: usize,
) -> Vec<FileScore> {
    let mut files: Vec<FileScore> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for &(idx, score) in ranked {
        let Some(chunk) = chunks.get(idx) else {
            continue;
        };

        match positions.get(chunk.path.as_str()).copied() {
            Some(pos) => files[pos].score += score,
            None => {
                positions.insert(chunk.path.as_str(), files.len());
                files.push(FileScore::new(chunk.path.clone(), score));
            }
        }
    }

    files.sort_by(|a, b| b.score.total_cmp(&a.score));
    files.truncate(top_k);
    files
}
