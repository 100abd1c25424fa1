//! Hybrid merge/insertion sort over bucket entries.
//!
//! Ranges shorter than [`INSERTION_SORT_THRESHOLD`] are insertion sorted
//! in place. Longer ranges are merge sorted, ping-ponging between the items
//! and a caller-owned scratch buffer so no allocation happens once the
//! scratch buffer has reached the bucket's capacity.

use std::cmp::Ordering;

/// Ranges shorter than this are insertion sorted.
pub(crate) const INSERTION_SORT_THRESHOLD: usize = 7;

/// Sorts `items` with `cmp`, using `scratch` as the auxiliary buffer.
///
/// `scratch` is emptied on return but keeps its capacity.
pub(crate) fn hybrid_sort<T, F>(items: &mut [T], scratch: &mut Vec<T>, mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }

    if items.len() < INSERTION_SORT_THRESHOLD {
        insertion_sort(items, &mut cmp);
        return;
    }

    scratch.clear();
    scratch.extend_from_slice(items);
    merge_sort(scratch.as_mut_slice(), items, &mut cmp);
    scratch.clear();
}

/// Sorts `dest`; `src` must hold the same elements on entry and is left
/// with an unspecified permutation of them.
fn merge_sort<T, F>(src: &mut [T], dest: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = dest.len();
    if len < INSERTION_SORT_THRESHOLD {
        insertion_sort(dest, cmp);
        return;
    }

    let mid = len / 2;
    merge_sort(&mut dest[..mid], &mut src[..mid], cmp);
    merge_sort(&mut dest[mid..], &mut src[mid..], cmp);

    // Halves already in order.
    if cmp(&src[mid - 1], &src[mid]) != Ordering::Greater {
        dest.swap_with_slice(src);
        return;
    }

    let (mut p, mut q) = (0, mid);
    for slot in dest.iter_mut() {
        let take_left = q >= len || (p < mid && cmp(&src[p], &src[q]) != Ordering::Greater);
        if take_left {
            std::mem::swap(slot, &mut src[p]);
            p += 1;
        } else {
            std::mem::swap(slot, &mut src[q]);
            q += 1;
        }
    }
}

fn insertion_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
