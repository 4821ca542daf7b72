use service::RecordService;

#[derive(Clone)]
pub struct AppState {
    pub records: RecordService,
}

impl AppState {
    pub fn new(records: RecordService) -> Self {
        Self { records }
    }
}
