use crate::PointId;
use crate::model::PointRegistry;

/// Maps a gate string from a departure feed onto a registered point.
///
/// `A12` and `b3` are looked up as they are. Terminal notation `1/12` or
/// `1-12` becomes `A12` for terminal 1 and `B12` for every other terminal.
/// Anything else must match a point label exactly, ignoring case.
pub fn resolve_gate(raw: &str, registry: &PointRegistry) -> Option<PointId> {
    let gate = raw.trim().to_uppercase();
    if gate.is_empty() {
        return None;
    }

    let label = terminal_gate(&gate).unwrap_or(gate);
    registry.find_by_label(&label).map(|point| point.id)
}

fn terminal_gate(gate: &str) -> Option<String> {
    let (terminal, number) = gate.split_once(['/', '-'])?;
    if !is_number(terminal) || !is_number(number) {
        return None;
    }
    let concourse = if terminal.parse::<u32>().ok()? == 1 {
        'A'
    } else {
        'B'
    };
    Some(format!("{concourse}{number}"))
}

fn is_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Building, Floor, PointOfInterest};

    fn registry() -> PointRegistry {
        let floor = Floor::pixel("F1", 0.1)
            .with_node("g-a12", 0.0, 0.0, "gate")
            .with_node("g-b5", 10.0, 0.0, "gate")
            .with_node("lounge", 20.0, 0.0, "lounge");
        let (building, _) = Building::new(None, vec![floor], vec![]);
        let points = [
            PointOfInterest::new("g-a12", "A12"),
            PointOfInterest::new("g-b5", "B5"),
            PointOfInterest::new("lounge", "Senator Lounge"),
        ];
        PointRegistry::build(&building, &points).0
    }

    #[test]
    fn direct_gate_names() {
        let registry = registry();
        assert_eq!(resolve_gate("A12", &registry), Some(1));
        assert_eq!(resolve_gate(" b5 ", &registry), Some(2));
    }

    #[test]
    fn terminal_notation() {
        let registry = registry();
        assert_eq!(resolve_gate("1/12", &registry), Some(1));
        assert_eq!(resolve_gate("2-5", &registry), Some(2));
        assert_eq!(resolve_gate("3/5", &registry), Some(2));
        assert_eq!(resolve_gate("2/12", &registry), None);
    }

    #[test]
    fn label_fallback_and_misses() {
        let registry = registry();
        assert_eq!(resolve_gate("senator lounge", &registry), Some(3));
        assert_eq!(resolve_gate("", &registry), None);
        assert_eq!(resolve_gate("Z99", &registry), None);
        assert_eq!(resolve_gate("1/", &registry), None);
    }
}
