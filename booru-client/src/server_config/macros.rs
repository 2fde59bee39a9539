#[macro_export]
macro_rules! server_config {
    ($name:expr, $pretty_name:expr, $server:expr, $client:expr, $base_url:expr, $post_list_url:expr, $page_param:expr, $posts_key:expr, $json_flag:expr, $post_page:expr, $tag_style:expr, $file_url_path:expr, $max_post_limit:expr) => {
        ServerConfig {
            name: String::from($name),
            pretty_name: String::from($pretty_name),
            server: $server,
            client_user_agent: String::from($client),
            base_url: String::from($base_url),
            post_list_url: String::from($post_list_url),
            page_param: $page_param,
            posts_key: $posts_key,
            json_flag: $json_flag,
            post_page: $post_page,
            tag_style: $tag_style,
            file_url_path: $file_url_path,
            auth_key_param: String::from("api_key"),
            auth_user_param: String::from("user_id"),
            max_post_limit: $max_post_limit,
        }
    };
}
