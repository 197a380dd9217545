/// Events emitted while a generation runs, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// A fresh grid was created for the given generation.
    Started { generation: usize },

    /// One cell was collapsed.
    Progress,

    /// The grid is complete.
    Completed {
        collapses: usize,
        contradictions: usize,
    },
}
