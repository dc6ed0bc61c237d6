//! Picking one shape out of several that all contain a click

use super::shape::Shape;

/// Choose among shapes that all contain the clicked point
///
/// For every pair of candidates whose bounding rectangles overlap, each
/// member scores `area(own rect) / area(overlap)`. A candidate keeps the
/// highest score it reaches against any rival, so the innermost of a
/// stack of nested shapes scores 1.0 while every container scores more.
/// The lowest kept score wins; ties go to the later (topmost) list index.
///
/// Returns the list index of the chosen candidate, or `None` when there
/// are no candidates.
pub fn disambiguate(candidates: &[(usize, &Shape)]) -> Option<usize> {
    match candidates {
        [] => return None,
        [(index, _)] => return Some(*index),
        _ => {}
    }

    let mut scores: Vec<Option<f64>> = vec![None; candidates.len()];
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let rect_i = candidates[i].1.bounding_rect();
            let rect_j = candidates[j].1.bounding_rect();
            let Some(overlap) = rect_i.intersection(&rect_j) else {
                continue;
            };
            let overlap_area = overlap.area();
            if overlap_area <= 0.0 {
                continue;
            }
            for (k, rect) in [(i, &rect_i), (j, &rect_j)] {
                let ratio = rect.area() / overlap_area;
                scores[k] = Some(scores[k].map_or(ratio, |s| s.max(ratio)));
            }
        }
    }

    let best = candidates
        .iter()
        .zip(&scores)
        .filter_map(|((index, _), score)| score.map(|s| (*index, s)))
        .fold(None::<(usize, f64)>, |best, (index, score)| match best {
            Some((best_index, best_score))
                if best_score < score || (best_score == score && best_index > index) =>
            {
                Some((best_index, best_score))
            }
            _ => Some((index, score)),
        });

    match best {
        Some((index, score)) => {
            log::debug!("disambiguated {} candidates: {index} (ratio {score:.3})", candidates.len());
            Some(index)
        }
        // No candidate pair overlaps with positive area: take the topmost.
        None => candidates.iter().map(|(index, _)| *index).max(),
    }
}
