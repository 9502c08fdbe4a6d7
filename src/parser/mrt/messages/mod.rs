pub(crate) mod bgp4mp;
