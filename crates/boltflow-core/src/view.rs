//! Sort/Filter View
//!
//! Pure transformations over a task snapshot.

use std::cmp::Ordering;

use crate::domain::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    CreatedAt,
    Priority,
    Status,
    Title,
}

impl SortField {
    pub const ALL: [SortField; 4] = [SortField::Title, SortField::Priority, SortField::Status, SortField::CreatedAt];

    /// Column heading
    pub fn label(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "Date Added",
            SortField::Priority => "Priority",
            SortField::Status => "Status",
            SortField::Title => "Task",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Selected sort key and order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same field flips the direction; a new field starts ascending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

fn compare(a: &Task, b: &Task, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Priority => a.priority.cmp(&b.priority),
        SortField::Status => a.status.cmp(&b.status),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

pub fn sort_tasks(tasks: &[Task], sort: SortState) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| match sort.direction {
        SortDirection::Asc => compare(a, b, sort.field),
        SortDirection::Desc => compare(b, a, sort.field),
    });
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    /// Not completed
    Active,
    Completed,
    All,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::Active => !task.is_completed(),
            TaskFilter::Completed => task.is_completed(),
            TaskFilter::All => true,
        }
    }
}

pub fn filter_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IdentityId, Priority, Status, TaskId};
    use chrono::{DateTime, Duration, Utc};

    fn task(n: i64, title: &str, priority: Priority, status: Status) -> Task {
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        Task {
            id: TaskId(format!("t{}", n)),
            title: title.to_string(),
            description: None,
            priority,
            status,
            user_id: IdentityId("u".into()),
            created_at: base + Duration::seconds(n),
            updated_at: base + Duration::seconds(n),
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn abc() -> Vec<Task> {
        vec![
            task(1, "A", Priority::Low, Status::ToDo),
            task(2, "B", Priority::High, Status::ToDo),
            task(3, "C", Priority::Medium, Status::ToDo),
        ]
    }

    #[test]
    fn test_priority_ascending_example() {
        let sorted = sort_tasks(&abc(), SortState::new(SortField::Priority, SortDirection::Asc));
        assert_eq!(titles(&sorted), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_priority_descending_reverses() {
        let sorted = sort_tasks(&abc(), SortState::new(SortField::Priority, SortDirection::Desc));
        assert_eq!(titles(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_created_at_descending_example() {
        let sorted = sort_tasks(&abc(), SortState::default());
        assert_eq!(titles(&sorted), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_status_rank() {
        let tasks = vec![
            task(1, "done", Priority::Low, Status::Completed),
            task(2, "todo", Priority::Low, Status::ToDo),
            task(3, "doing", Priority::Low, Status::InProgress),
        ];
        let sorted = sort_tasks(&tasks, SortState::new(SortField::Status, SortDirection::Asc));
        assert_eq!(titles(&sorted), vec!["todo", "doing", "done"]);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        let tasks = vec![
            task(1, "banana", Priority::Low, Status::ToDo),
            task(2, "Apple", Priority::Low, Status::ToDo),
            task(3, "cherry", Priority::Low, Status::ToDo),
        ];
        let sorted = sort_tasks(&tasks, SortState::new(SortField::Title, SortDirection::Asc));
        assert_eq!(titles(&sorted), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_every_permutation_sorts_by_priority() {
        let base = abc();
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders {
            let input: Vec<Task> = order.iter().map(|&i| base[i].clone()).collect();
            let sorted = sort_tasks(&input, SortState::new(SortField::Priority, SortDirection::Asc));
            let ranks: Vec<Priority> = sorted.iter().map(|t| t.priority).collect();
            assert_eq!(ranks, vec![Priority::Low, Priority::Medium, Priority::High]);
        }
    }

    #[test]
    fn test_toggle_same_field_flips() {
        let start = SortState::new(SortField::Title, SortDirection::Asc);
        let once = start.toggle(SortField::Title);
        assert_eq!(once.direction, SortDirection::Desc);
        assert_eq!(once.toggle(SortField::Title), start);
    }

    #[test]
    fn test_toggle_new_field_resets_ascending() {
        let state = SortState::default().toggle(SortField::Priority);
        assert_eq!(state, SortState::new(SortField::Priority, SortDirection::Asc));
    }

    #[test]
    fn test_double_toggle_restores_order() {
        let tasks = abc();
        let start = SortState::new(SortField::Priority, SortDirection::Asc);
        let back = start.toggle(SortField::Priority).toggle(SortField::Priority);
        assert_eq!(sort_tasks(&tasks, start), sort_tasks(&tasks, back));
    }

    #[test]
    fn test_filters_partition() {
        let tasks = vec![
            task(1, "a", Priority::Low, Status::Completed),
            task(2, "b", Priority::Low, Status::InProgress),
            task(3, "c", Priority::Low, Status::ToDo),
        ];
        assert_eq!(titles(&filter_tasks(&tasks, TaskFilter::Completed)), vec!["a"]);
        assert_eq!(titles(&filter_tasks(&tasks, TaskFilter::Active)), vec!["b", "c"]);
        assert_eq!(filter_tasks(&tasks, TaskFilter::All).len(), 3);
    }
}
