use ndarray::Array2;
use num_traits::Num;

pub fn binarise_array<T: Num + Clone>(a : &Array2<T>) -> Array2<u8> {
    a.mapv(|x| (!x.is_zero()) as u8)
}

/// Like [`binarise_array`], but marks a cell filled only once its value
/// reaches `threshold`. Used by the scorer to binarise count-grids (e.g.
/// crossing counts) rather than plain occupancy grids.
pub fn binarise_array_threshold<T: Num + Clone + PartialOrd>(a: &Array2<T>, threshold: T) -> Array2<u8> {
    a.mapv(|x| (x >= threshold) as u8)
}
