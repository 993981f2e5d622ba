use crate::LoadGeneration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistSearchTerm(String),
    StartLoad { generation: LoadGeneration },
    CancelLoad { generation: LoadGeneration },
}
