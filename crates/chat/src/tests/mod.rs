//! Session-level tests driven through a scripted inference client.
