mod header_vm;
mod lab_vm;
mod markdown_vm;
mod nav_vm;

pub use header_vm::{HeaderVm, PointsToast, ResetConfirm, map_header};
pub use lab_vm::{CONTEXT_SAMPLE, LAB_ERROR_MESSAGE, LabOutput, context_summary_request, lab_request};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use nav_vm::{NavItemVm, completion_percent, map_nav_items};
