// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for text-generation services.

use async_trait::async_trait;

use crate::error::HelpdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for an external text-generation service.
///
/// The model identifier and system instruction are fixed by the adapter's
/// configuration; callers supply only the composite prompt.
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Sends a completion request and returns the single top reply.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, HelpdeskError>;
}
