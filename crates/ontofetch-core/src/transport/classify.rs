//! Map curl errors onto fault kinds.

use super::error::IoFaultKind;

pub fn classify_curl_error(e: &curl::Error) -> IoFaultKind {
    if e.is_operation_timedout() {
        return IoFaultKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return IoFaultKind::Connection;
    }
    IoFaultKind::Other
}
