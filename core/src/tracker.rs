//! Task-done tracker: who has already taken each customer-service task today.
//!
//! Scoped to one slot-assignment pass. Once too few employees are left
//! with a task still undone, the task's flags clear for everyone so the
//! rotation never narrows down to the same one or two people.

use crate::{roster::CsTask, types::EmployeeId};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFlags {
    pub fitting_room: bool,
    pub greeter:      bool,
    pub register:     bool,
}

impl TaskFlags {
    fn get(&self, task: CsTask) -> bool {
        match task {
            CsTask::FittingRoom => self.fitting_room,
            CsTask::Greeter => self.greeter,
            CsTask::Register => self.register,
        }
    }

    fn set(&mut self, task: CsTask, done: bool) {
        match task {
            CsTask::FittingRoom => self.fitting_room = done,
            CsTask::Greeter => self.greeter = done,
            CsTask::Register => self.register = done,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskDoneTracker {
    flags: BTreeMap<EmployeeId, TaskFlags>,
}

impl TaskDoneTracker {
    /// Every employee starts with every task undone.
    pub fn new<I>(employees: I) -> Self
    where
        I: IntoIterator<Item = EmployeeId>,
    {
        Self {
            flags: employees
                .into_iter()
                .map(|e| (e, TaskFlags::default()))
                .collect(),
        }
    }

    pub fn is_done(&self, employee: &str, task: CsTask) -> bool {
        self.flags.get(employee).is_some_and(|f| f.get(task))
    }

    /// Members of `pool` that have not done `task` yet, in pool order.
    pub fn not_done(&self, pool: &[EmployeeId], task: CsTask) -> Vec<EmployeeId> {
        pool.iter()
            .filter(|e| !self.is_done(e, task))
            .cloned()
            .collect()
    }

    pub fn remaining(&self, task: CsTask) -> usize {
        self.flags.values().filter(|f| !f.get(task)).count()
    }

    /// Clear `task` for everyone.
    pub fn reset(&mut self, task: CsTask) {
        for flags in self.flags.values_mut() {
            flags.set(task, false);
        }
    }

    /// Mark `employees` as having done `task`, then apply the starvation
    /// rule: with `threshold` or fewer still undone, clear the task for
    /// everyone. Returns true when that reset fired.
    pub fn mark_done(&mut self, employees: &[EmployeeId], task: CsTask, threshold: usize) -> bool {
        for e in employees {
            if let Some(flags) = self.flags.get_mut(e) {
                flags.set(task, true);
            }
        }
        if self.remaining(task) <= threshold {
            self.reset(task);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<EmployeeId> {
        (0..n).map(|i| format!("e{i}")).collect()
    }

    #[test]
    fn starts_all_undone() {
        let t = TaskDoneTracker::new(names(4));
        for task in CsTask::ORDER {
            assert_eq!(t.remaining(task), 4);
        }
    }

    #[test]
    fn marking_filters_candidates_per_task() {
        let pool = names(5);
        let mut t = TaskDoneTracker::new(pool.clone());
        assert!(!t.mark_done(&pool[..1], CsTask::Greeter, 2));

        let left = t.not_done(&pool, CsTask::Greeter);
        assert_eq!(left.len(), 4);
        assert!(!left.contains(&"e0".to_string()));
        assert_eq!(t.not_done(&pool, CsTask::Register).len(), 5);
    }

    #[test]
    fn reset_fires_at_threshold() {
        let pool = names(5);
        let mut t = TaskDoneTracker::new(pool.clone());

        assert!(!t.mark_done(&pool[..2], CsTask::FittingRoom, 2));
        assert_eq!(t.remaining(CsTask::FittingRoom), 3);

        // Third marking leaves two undone, which is at the threshold.
        assert!(t.mark_done(&pool[2..3], CsTask::FittingRoom, 2));
        assert_eq!(t.remaining(CsTask::FittingRoom), 5);
    }

    #[test]
    fn unknown_employees_are_ignored() {
        let mut t = TaskDoneTracker::new(names(4));
        assert!(!t.mark_done(&["ghost".to_string()], CsTask::Register, 2));
        assert_eq!(t.remaining(CsTask::Register), 4);
        assert!(!t.is_done("ghost", CsTask::Register));
    }
}
