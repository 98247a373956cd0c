use lander_parts::Part;

/// Asks the user before a part is removed
pub trait Confirm: Send {
    fn confirm_remove(&self, part: &Part) -> bool;
}

/// Approves every removal
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm_remove(&self, _part: &Part) -> bool {
        true
    }
}

impl<F> Confirm for F
where
    F: Fn(&Part) -> bool + Send,
{
    fn confirm_remove(&self, part: &Part) -> bool {
        self(part)
    }
}
