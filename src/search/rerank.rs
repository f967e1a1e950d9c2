/// A chunk index paired with a score.
pub type Scored<T> = (usize, T);

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Indices of the `limit` highest lexical scores.
///
/// Stable sort on descending score: equal scores keep ascending chunk order.
pub fn top_lexical(scores: &[f64], limit: usize) -> Vec<Scored<f64>> {
    let mut ranked: Vec<Scored<f64>> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Re-score `candidates` by cosine similarity to `query` and keep the best
/// `limit`.
///
/// Candidate vectors are looked up in `embeddings` by chunk index. Stable sort
/// on descending similarity: ties keep candidate order.
pub fn rerank(
    query: &[f32],
    candidates: &[usize],
    embeddings: &[Vec<f32>],
    limit: usize,
) -> Vec<Scored<f32>> {
    let mut ranked: Vec<Scored<f32>> = candidates
        .iter()
        .filter_map(|&i| {
            embeddings
                .get(i)
                .map(|vector| (i, cosine_similarity(query, vector)))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
