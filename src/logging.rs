/// Standardized logging macros for consistent field names and message patterns across the application
///
/// Field names used throughout: `operation`, `question_id`, `category_id`,
/// `page`, `count`, `error`.

// ============================================================================
// API Operation Logging Macros
// ============================================================================

/// Log the start of an API operation with consistent fields
#[macro_export]
macro_rules! log_api_start {
    ($operation:expr, question_id = $question_id:expr) => {
        tracing::debug!(
            operation = $operation,
            question_id = %$question_id,
            "API operation started"
        );
    };
    ($operation:expr, category_id = $category_id:expr) => {
        tracing::debug!(
            operation = $operation,
            category_id = %$category_id,
            "API operation started"
        );
    };
    ($operation:expr, page = $page:expr) => {
        tracing::debug!(
            operation = $operation,
            page = $page,
            "API operation started"
        );
    };
    ($operation:expr) => {
        tracing::debug!(
            operation = $operation,
            "API operation started"
        );
    };
}

/// Log successful completion of an API operation
#[macro_export]
macro_rules! log_api_success {
    ($operation:expr, question_id = $question_id:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            question_id = %$question_id,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, count = $count:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            count = $count,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            "API operation completed: {}", $msg
        );
    };
}

/// Log API operation errors with consistent structure
#[macro_export]
macro_rules! log_api_error {
    ($operation:expr, question_id = $question_id:expr, error = $error:expr, $msg:expr) => {
        tracing::error!(
            operation = $operation,
            question_id = %$question_id,
            error = %$error,
            "API operation failed: {}", $msg
        );
    };
    ($operation:expr, error = $error:expr, $msg:expr) => {
        tracing::error!(
            operation = $operation,
            error = %$error,
            "API operation failed: {}", $msg
        );
    };
}

/// Log API warnings with context
#[macro_export]
macro_rules! log_api_warn {
    ($operation:expr, question_id = $question_id:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            question_id = %$question_id,
            "API operation warning: {}", $msg
        );
    };
    ($operation:expr, category_id = $category_id:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            category_id = %$category_id,
            "API operation warning: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            "API operation warning: {}", $msg
        );
    };
}

// ============================================================================
// Service Layer Logging Macros
// ============================================================================

#[macro_export]
macro_rules! log_service_start {
    ($service:expr, $operation:expr, question_id = $question_id:expr) => {
        tracing::debug!(
            service = $service,
            operation = $operation,
            question_id = %$question_id,
            "Service operation started"
        );
    };
    ($service:expr, $operation:expr) => {
        tracing::debug!(
            service = $service,
            operation = $operation,
            "Service operation started"
        );
    };
}

#[macro_export]
macro_rules! log_service_success {
    ($service:expr, $operation:expr, count = $count:expr) => {
        tracing::debug!(
            service = $service,
            operation = $operation,
            result_count = $count,
            "Service operation completed successfully"
        );
    };
    ($service:expr, $operation:expr, $msg:expr) => {
        tracing::debug!(
            service = $service,
            operation = $operation,
            "Service operation completed: {}", $msg
        );
    };
}

#[macro_export]
macro_rules! log_service_warn {
    ($service:expr, $operation:expr, $msg:expr) => {
        tracing::warn!(
            service = $service,
            operation = $operation,
            "Service warning: {}",
            $msg
        );
    };
}

// ============================================================================
// Database Operation Logging Macros
// ============================================================================

/// Log database operation results
#[macro_export]
macro_rules! log_db_operation {
    (debug, $operation:expr, question_id = $question_id:expr) => {
        tracing::debug!(
            component = "database",
            operation = $operation,
            question_id = %$question_id,
            "Database operation completed"
        );
    };
    (debug, $operation:expr, count = $count:expr) => {
        tracing::debug!(
            component = "database",
            operation = $operation,
            result_count = $count,
            "Database operation completed"
        );
    };
    (info, $operation:expr, $msg:expr) => {
        tracing::info!(
            component = "database",
            operation = $operation,
            "Database operation: {}", $msg
        );
    };
    (error, $operation:expr, error = $error:expr) => {
        tracing::error!(
            component = "database",
            operation = $operation,
            error = %$error,
            "Database operation failed"
        );
    };
}

// ============================================================================
// System Event Logging Macros
// ============================================================================

/// Log system startup and shutdown events
#[macro_export]
macro_rules! log_system_event {
    (startup, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "startup",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (shutdown, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "shutdown",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (config, $msg:expr) => {
        tracing::info!(event_type = "configuration", "System event: {}", $msg);
    };
}

// ============================================================================
// Validation Logging Macros
// ============================================================================

/// Log validation results consistently
#[macro_export]
macro_rules! log_validation {
    (success, $component:expr, $msg:expr) => {
        tracing::debug!(
            event_type = "validation",
            component = $component,
            result = "success",
            "Validation completed: {}", $msg
        );
    };
    (failure, $component:expr, error = $error:expr) => {
        tracing::warn!(
            event_type = "validation",
            component = $component,
            result = "failure",
            error = %$error,
            "Validation failed"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_logging_macros_compile() {
        let question_id = 12_i64;
        let error = anyhow::anyhow!("test error");

        log_api_start!("test_operation", question_id = question_id);
        log_api_start!("test_operation", category_id = 3);
        log_api_start!("test_operation", page = 2_i64);
        log_api_start!("test_operation");

        log_api_success!("test_operation", question_id = question_id, "question deleted");
        log_api_success!("test_operation", count = 5, "questions listed");
        log_api_success!("test_operation", "done");

        log_api_warn!("test_operation", question_id = question_id, "question not found");
        log_api_warn!("test_operation", category_id = 9, "category not found");
        log_api_error!("test_operation", question_id = question_id, error = error, "delete failed");
        log_api_error!("test_operation", error = error, "insert failed");

        log_service_start!("trivia_service", "delete_question", question_id = question_id);
        log_service_start!("trivia_service", "list_categories");
        log_service_success!("trivia_service", "list_categories", count = 6);
        log_service_success!("trivia_service", "create_question", "question created");
        log_service_warn!("trivia_service", "list_questions", "dangling category");

        log_db_operation!(debug, "delete_question", question_id = question_id);
        log_db_operation!(debug, "list_questions", count = 19);
        log_db_operation!(info, "migration", "database initialized");
        log_db_operation!(error, "insert_question", error = error);

        log_system_event!(startup, component = "server", "server starting");
        log_system_event!(shutdown, component = "server", "server stopped");
        log_system_event!(config, "configuration loaded successfully");

        log_validation!(success, "configuration", "request validated");
        log_validation!(failure, "configuration", error = error);
    }
}
