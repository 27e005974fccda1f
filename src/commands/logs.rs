//! Log queries, printed as raw JSON

use crate::cli::LogsCommand;
use crate::client::RequestDescriptor;

pub(super) fn request(command: &LogsCommand) -> RequestDescriptor {
    match command {
        LogsCommand::Bcid { bc_id, page } => RequestDescriptor::new("richLogsByBcId")
            .param("id", *bc_id)
            .param("page", *page),
        LogsCommand::Idtype { id_type, id, page } => RequestDescriptor::new("richLogsByIdType")
            .param("idType", id_type.id_type())
            .param("id", *id)
            .param("page", *page),
        LogsCommand::Logtype { log_type, page } => RequestDescriptor::new("richLogsByLogType")
            .param("logType", log_type.as_str())
            .param("page", *page),
        LogsCommand::Inputs { bc_id, date } => RequestDescriptor::new("dailyUserInputs")
            .param("id", *bc_id)
            .param("date", date.as_str()),
    }
}
