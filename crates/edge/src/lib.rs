//! Remote-invoke boundary of the AI service layer.
//!
//! Every facade call ends in [`FunctionInvoker::invoke`]: a named serverless
//! function receives a JSON body and answers with JSON or an error message.

pub mod cors;
mod invoker;
pub mod salvage;
mod supabase;
pub mod testing;

pub use invoker::{FunctionInvoker, InvokeError, InvokeErrorBody, InvokeResponse};
pub use salvage::{coerce_payload, parse_model_json, salvage_fields, SalvageError};
pub use supabase::{SupabaseFunctionsClient, CLIENT_INFO};
