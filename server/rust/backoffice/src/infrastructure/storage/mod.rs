pub mod local_sign_image_store;
