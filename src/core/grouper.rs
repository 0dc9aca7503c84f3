/// Grouping and sorting of ranked candidates
///
/// Recent entries come first, then every other group in the order it was
/// first seen. Order inside a group is the ranked order.

use crate::core::command::Command;
use std::collections::HashMap;

/// One run of the flattened list: a group label and how many rows it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRun {
    pub group: String,
    pub count: usize,
}

/// Run-length view of a flattened list, for renderers that draw group headers
pub type GroupSummary = Vec<GroupRun>;

/// Stable reorder: recent bucket, then first-seen group buckets
pub fn group_and_sort(ranked: Vec<Command>) -> Vec<Command> {
    let mut recent = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<Command>> = Vec::new();

    for cmd in ranked {
        if cmd.is_recent() {
            recent.push(cmd);
            continue;
        }

        let slot = match slots.get(&cmd.group) {
            Some(&slot) => slot,
            None => {
                slots.insert(cmd.group.clone(), buckets.len());
                buckets.push(Vec::new());
                buckets.len() - 1
            }
        };
        buckets[slot].push(cmd);
    }

    recent.extend(buckets.into_iter().flatten());
    recent
}

/// Run-length encoding of group labels over the flattened list
pub fn summarize(flattened: &[Command]) -> GroupSummary {
    let mut summary: GroupSummary = Vec::new();

    for cmd in flattened {
        match summary.last_mut() {
            Some(run) if run.group == cmd.group => run.count += 1,
            _ => summary.push(GroupRun {
                group: cmd.group.clone(),
                count: 1,
            }),
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::CommandType;

    fn cmd(id: &str, group: &str) -> Command {
        Command::new(id, id, CommandType::Note, group)
    }

    fn ids(commands: &[Command]) -> Vec<&str> {
        commands.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_recent_first_then_first_seen() {
        let ranked = vec![
            cmd("n1", "Notes"),
            cmd("t1", "Tags"),
            cmd("r1", "recent"),
            cmd("n2", "Notes"),
            cmd("b1", "Notebooks"),
            cmd("t2", "Tags"),
            cmd("r2", "recent"),
        ];

        let flat = group_and_sort(ranked);
        assert_eq!(ids(&flat), vec!["r1", "r2", "n1", "n2", "t1", "t2", "b1"]);
    }

    #[test]
    fn test_summary_replays_labels() {
        let flat = group_and_sort(vec![
            cmd("a", "General"),
            cmd("r", "recent"),
            cmd("b", "View"),
            cmd("c", "General"),
        ]);
        let summary = summarize(&flat);

        let total: usize = summary.iter().map(|r| r.count).sum();
        assert_eq!(total, flat.len());

        let replayed: Vec<&str> = summary
            .iter()
            .flat_map(|run| std::iter::repeat(run.group.as_str()).take(run.count))
            .collect();
        let labels: Vec<&str> = flat.iter().map(|c| c.group.as_str()).collect();
        assert_eq!(replayed, labels);

        assert_eq!(
            summary,
            vec![
                GroupRun { group: "recent".into(), count: 1 },
                GroupRun { group: "General".into(), count: 2 },
                GroupRun { group: "View".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(group_and_sort(Vec::new()).is_empty());
        assert!(summarize(&[]).is_empty());
    }
}
