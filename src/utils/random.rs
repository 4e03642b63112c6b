//! Random selection helpers: grab-bag sampling and uniform picks.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::scene::graph::{NodeId, SceneGraph};

/// Error raised when a sampling request cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The request asked for more elements than the source can provide.
    #[error("requested {requested} elements but only {available} are available")]
    OutOfRange { requested: usize, available: usize },
}

/// Draws `amount` distinct elements from a grab bag, never drawing
/// absent entries.
///
/// `None` entries are filtered out before a uniform shuffle, so every
/// permutation of the usable entries is equally likely. The sample is
/// materialized eagerly; reading the returned `Vec` twice never
/// reshuffles. The request fails when `amount` exceeds the original
/// collection size, or when fewer usable entries than `amount` survive
/// the filter.
pub fn grab<T, R>(items: &[Option<T>], amount: usize, rng: &mut R) -> Result<Vec<T>, SampleError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if amount > items.len() {
        return Err(SampleError::OutOfRange {
            requested: amount,
            available: items.len(),
        });
    }
    if amount == 0 {
        return Ok(Vec::new());
    }

    let mut bag: Vec<T> = items.iter().filter_map(|slot| slot.clone()).collect();
    if amount > bag.len() {
        return Err(SampleError::OutOfRange {
            requested: amount,
            available: bag.len(),
        });
    }

    bag.shuffle(rng);
    bag.truncate(amount);
    Ok(bag)
}

/// [`grab`] over scene nodes: a stale handle counts as an absent entry.
pub fn grab_live<R>(
    graph: &SceneGraph,
    ids: &[NodeId],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<NodeId>, SampleError>
where
    R: Rng + ?Sized,
{
    let slots: Vec<Option<NodeId>> = ids
        .iter()
        .map(|&id| graph.is_live(id).then_some(id))
        .collect();
    grab(&slots, amount, rng)
}

/// Uniform index into a collection of `len` elements; `None` when empty.
pub fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.gen_range(0..len))
}

/// Uniform pick from a slice; `None` when the slice is empty.
pub fn random_element<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    random_index(items.len(), rng).map(|index| &items[index])
}

/// Applies `action` to every element in index order.
pub fn for_each_indexed<T>(items: &[T], mut action: impl FnMut(usize, &T)) {
    for (index, item) in items.iter().enumerate() {
        action(index, item);
    }
}
