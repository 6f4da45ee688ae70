pub mod use_dom_id;
