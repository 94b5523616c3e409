use rayon::prelude::*;

use super::indoor_routing::resolve_point;
use super::{RoutingOptions, RoutingRequest, shortest_path_tree};
use crate::model::BuildingModel;
use crate::{Error, NodeId};

/// Graph distance between every pair of the given points.
///
/// `matrix[i][j]` is the distance from `point_ids[i]` to `point_ids[j]`,
/// `None` when unreachable. One solver run per source, in parallel.
///
/// # Errors
///
/// Fails before any routing if one of the ids is invalid or unknown
pub fn distance_matrix(
    model: &BuildingModel,
    point_ids: &[i64],
    options: &RoutingOptions,
) -> Result<Vec<Vec<Option<f64>>>, Error> {
    let nodes = point_ids
        .iter()
        .map(|&id| {
            RoutingRequest::new(id, id).validate()?;
            resolve_point(model, id)
        })
        .collect::<Result<Vec<&NodeId>, Error>>()?;

    let adjacency = model.adjacency(options.adjacency_options());
    let matrix = nodes
        .par_iter()
        .map(|source| {
            let paths = shortest_path_tree(adjacency, source, options.frontier);
            nodes
                .iter()
                .map(|target| Some(paths.distance(target)).filter(|d| d.is_finite()))
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Floor;

    #[test]
    fn matrix_is_symmetric_for_undirected_floors() {
        let floor = Floor::pixel("F1", 1.0)
            .with_node("a", 0.0, 0.0, "gate")
            .with_node("b", 1.0, 0.0, "gate")
            .with_node("c", 2.0, 0.0, "gate")
            .with_node("d", 9.0, 9.0, "gate")
            .with_edge("a", "b", 2.0)
            .with_edge("b", "c", 3.0)
            .with_edge("a", "c", 7.0);
        let model = BuildingModel::new(None, vec![floor], vec![], &[], Vec::new());

        let matrix = distance_matrix(&model, &[1, 2, 3, 4], &RoutingOptions::default()).unwrap();

        assert_eq!(matrix[0], vec![Some(0.0), Some(2.0), Some(5.0), None]);
        for (i, row) in matrix.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert_eq!(*value, matrix[j][i]);
            }
        }
        assert_eq!(matrix[3][3], Some(0.0));
    }

    #[test]
    fn unknown_point_fails_upfront() {
        let floor = Floor::pixel("F1", 1.0).with_node("a", 0.0, 0.0, "gate");
        let model = BuildingModel::new(None, vec![floor], vec![], &[], Vec::new());

        assert!(matches!(
            distance_matrix(&model, &[1, 7], &RoutingOptions::default()),
            Err(Error::UnknownPoint(7))
        ));
    }
}
