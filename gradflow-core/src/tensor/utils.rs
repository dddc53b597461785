use crate::error::GradFlowError;
use std::cmp::max;

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
/// 4. The resulting dimension is the larger of the two.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, GradFlowError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = shape_a.get(rank_a.wrapping_sub(1 + i)).copied().unwrap_or(1);
        let dim_b = shape_b.get(rank_b.wrapping_sub(1 + i)).copied().unwrap_or(1);

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(GradFlowError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// Converts a linear (row-major) index into multi-dimensional coordinates.
pub fn index_to_coord(index: usize, strides: &[usize], shape: &[usize]) -> Vec<usize> {
    let mut coord = vec![0; shape.len()];
    let mut current_index = index;
    for i in 0..shape.len() {
        if strides[i] != 0 {
            coord[i] = current_index / strides[i];
            current_index %= strides[i];
        }
    }
    coord
}

/// Maps coordinates of a broadcast result back to the linear index of an operand.
///
/// Leading dimensions missing from `original_shape` are ignored and size-1 dimensions
/// always read coordinate 0.
pub fn coord_to_index_broadcasted(
    target_coord: &[usize],
    original_shape: &[usize],
    original_strides: &[usize],
) -> usize {
    let rank_diff = target_coord.len().saturating_sub(original_shape.len());
    let mut index = 0;
    for i in 0..original_shape.len() {
        let effective_coord = if original_shape[i] == 1 {
            0
        } else {
            target_coord[rank_diff + i]
        };
        index += effective_coord * original_strides[i];
    }
    index
}

/// Validates reduction axes against `rank`, returning them sorted and deduplicated.
/// An empty slice selects every axis.
pub fn normalize_axes(axes: &[usize], rank: usize) -> Result<Vec<usize>, GradFlowError> {
    if axes.is_empty() {
        return Ok((0..rank).collect());
    }
    let mut normalized = Vec::with_capacity(axes.len());
    for &axis in axes {
        if axis >= rank {
            return Err(GradFlowError::InvalidAxis { axis, rank });
        }
        if !normalized.contains(&axis) {
            normalized.push(axis);
        }
    }
    normalized.sort_unstable();
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_strides_simple() {
        assert_eq!(calculate_strides(&[2, 3]), vec![3, 1]);
        assert_eq!(calculate_strides(&[4, 5, 6]), vec![30, 6, 1]);
        assert_eq!(calculate_strides(&[5]), vec![1]);
        assert_eq!(calculate_strides(&[5, 1]), vec![1, 1]);
    }

    #[test]
    fn test_calculate_strides_empty() {
        assert_eq!(calculate_strides(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_broadcast_shapes_equal() {
        assert_eq!(broadcast_shapes(&[2, 3], &[2, 3]), Ok(vec![2, 3]));
        assert_eq!(broadcast_shapes(&[], &[]), Ok(vec![]));
    }

    #[test]
    fn test_broadcast_shapes_scalar() {
        assert_eq!(broadcast_shapes(&[2, 3], &[]), Ok(vec![2, 3]));
        assert_eq!(broadcast_shapes(&[], &[2, 3]), Ok(vec![2, 3]));
    }

    #[test]
    fn test_broadcast_shapes_prepend_ones() {
        assert_eq!(broadcast_shapes(&[4, 5], &[5]), Ok(vec![4, 5]));
        assert_eq!(broadcast_shapes(&[2, 3, 4], &[3, 1]), Ok(vec![2, 3, 4]));
        assert_eq!(broadcast_shapes(&[4, 1], &[1, 5]), Ok(vec![4, 5]));
    }

    #[test]
    fn test_broadcast_shapes_incompatible() {
        let err = broadcast_shapes(&[2, 3], &[2, 4]).unwrap_err();
        assert_eq!(
            err,
            GradFlowError::BroadcastError {
                shape1: vec![2, 3],
                shape2: vec![2, 4]
            }
        );
    }

    #[test]
    fn test_index_to_coord_round_trip_with_broadcast_index() {
        let shape = [2, 3];
        let strides = calculate_strides(&shape);
        let coord = index_to_coord(5, &strides, &shape);
        assert_eq!(coord, vec![1, 2]);
        // A [3] operand broadcast against [2, 3] reads column 2.
        assert_eq!(coord_to_index_broadcasted(&coord, &[3], &[1]), 2);
        // A [2, 1] operand reads row 1.
        assert_eq!(coord_to_index_broadcasted(&coord, &[2, 1], &[1, 1]), 1);
    }

    #[test]
    fn test_normalize_axes() {
        assert_eq!(normalize_axes(&[], 3), Ok(vec![0, 1, 2]));
        assert_eq!(normalize_axes(&[2, 0, 2], 3), Ok(vec![0, 2]));
        assert_eq!(
            normalize_axes(&[3], 3),
            Err(GradFlowError::InvalidAxis { axis: 3, rank: 3 })
        );
    }
}
