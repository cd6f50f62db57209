// Code generated by mockgen. DO NOT EDIT.
// Contract: crate::examples::Example

#[allow(unused_imports)]
use crate::examples;
#[allow(unused_imports)]
use crate::sync;
#[allow(unused_imports)]
use mockgen_ledger;
#[allow(unused_imports)]
use mockgen_ledger::assert;

/// Replaying mock for `Example`.
pub struct ExampleMock {
    handle: mockgen_ledger::TestHandle,
    ledger: mockgen_ledger::Ledger,
}

impl ExampleMock {
    /// Creates a mock reporting to `handle`. Unconsumed expectations fail
    /// the test when the mock is dropped.
    pub fn new(handle: &mockgen_ledger::TestHandle) -> Self {
        ExampleMock {
            handle: handle.clone(),
            ledger: mockgen_ledger::Ledger::new(),
        }
    }

    pub fn ledger(&self) -> &mockgen_ledger::Ledger {
        &self.ledger
    }

    pub fn assert_no_calls_left(&self) -> bool {
        self.ledger.assert_no_calls_left(&self.handle)
    }

    /// Expects a call to `other`.
    pub fn assert_other_call(&self, value: i64, out001: Result<(), examples::Failure>) {
        self.ledger.append_call("other", vec![Box::new(value) as mockgen_ledger::Value, Box::new(out001) as mockgen_ledger::Value]);
    }

    /// Expects a call to `fetch`.
    pub fn assert_fetch_call(&self, id: u32, out001: String) {
        self.ledger.append_call("fetch", vec![Box::new(id) as mockgen_ledger::Value, Box::new(out001) as mockgen_ledger::Value]);
    }

    /// Expects a call to `lookup`.
    pub fn assert_lookup_call(&self, key: String, out001: Option<u32>) {
        self.ledger.append_call("lookup", vec![Box::new(key) as mockgen_ledger::Value, Box::new(out001) as mockgen_ledger::Value]);
    }

    /// Expects a call to `load`.
    pub fn assert_load_call(&self, out001: Box<examples::Str>) {
        self.ledger.append_call("load", vec![Box::new(out001) as mockgen_ledger::Value]);
    }

    /// Expects a call to `interface`.
    pub fn assert_interface_call(&self, o: std::sync::Arc<dyn examples::OInterface + Send + Sync>) {
        self.ledger.append_call("interface", vec![Box::new(o) as mockgen_ledger::Value]);
    }

    /// Expects a call to `many`.
    pub fn assert_many_call(&self, os: Vec<std::sync::Arc<dyn examples::OInterface + Send + Sync>>) {
        self.ledger.append_call("many", vec![Box::new(os) as mockgen_ledger::Value]);
    }
}

impl Drop for ExampleMock {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.ledger.assert_no_calls_left(&self.handle);
        }
    }
}

#[allow(unused_variables, unused_mut)]
impl examples::Example for ExampleMock {
    fn other(&self, value: i64) -> Result<(), examples::Failure> {
        let mut __call = self.ledger.next(&self.handle, "other");
        assert::equal_values(&self.handle, __call.get(0), &value, "value", __call.index());
        mockgen_ledger::to_result(__call.take(1))
    }

    fn fetch(&self, id: u32, token: sync::CancellationToken) -> String {
        let mut __call = self.ledger.next(&self.handle, "fetch");
        assert::equal_values(&self.handle, __call.get(0), &id, "id", __call.index());
        mockgen_ledger::cast::<String>(__call.take(1))
    }

    fn lookup(&self, key: String) -> Option<u32> {
        let mut __call = self.ledger.next(&self.handle, "lookup");
        assert::equal_values(&self.handle, __call.get(0), &key, "key", __call.index());
        mockgen_ledger::to_option(__call.take(1))
    }

    fn load(&self) -> Box<examples::Str> {
        let mut __call = self.ledger.next(&self.handle, "load");
        mockgen_ledger::to_pointer::<examples::Str>(__call.take(0))
    }

    fn interface(&self, o: std::sync::Arc<dyn examples::OInterface + Send + Sync>) {
        let __call = self.ledger.next(&self.handle, "interface");
        assert::same_object(&self.handle, __call.get(0), &o, "o", __call.index());
    }

    fn many(&self, os: Vec<std::sync::Arc<dyn examples::OInterface + Send + Sync>>) {
        let __call = self.ledger.next(&self.handle, "many");
        assert::same_objects(&self.handle, __call.get(0), &os, "os", __call.index());
    }
}
