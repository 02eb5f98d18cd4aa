use super::*;
use regex::Regex;

const BASE: &str = "https://www.dianping.com";

const RANK_HTML: &str = r#"
<html><body>
<div class="shop-all-list"><ul>
  <li>
    <div class="pic"><img src="https://img.example/1.jpg"></div>
    <div class="tit"><a href="https://www.dianping.com/shop/k3CUvpO8jhgs5f6X"><h4>海底捞火锅(三里屯店)</h4></a></div>
    <div class="nebula_star"><div class="star_icon"><span class="star star_45 star_sml"></span></div></div>
    <a class="review-num"><b>12345</b>条评价</a>
    <a class="mean-price">人均<b>￥128</b></a>
    <div class="tag-addr">
      <a><span class="tag">火锅</span></a>
      <a><span class="tag">三里屯/工体</span></a>
    </div>
    <div class="recommend">
      <a class="recommend-click">毛肚</a>
      <a class="recommend-click">虾滑</a>
    </div>
  </li>
  <li>
    <div class="tit"><a href="/shop/H1aBc2?from=list"><h4>
        小店
    </h4></a></div>
    <div class="nebula_star"><div class="star_icon"><span class="star star_50"></span></div></div>
  </li>
  <li>
    <div class="nebula_star"><div class="star_icon"><span class="star"></span></div></div>
  </li>
</ul></div>
</body></html>
"#;

const DETAIL_HTML: &str = r#"
<html><body>
  <h1 class="shopName">海底捞火锅(三里屯店)</h1>
  <span class="star-score">4.8</span>
  <span class="reviews">12345条评价</span>
  <span class="price">人均:128元</span>
  <span class="region">三里屯</span>
  <span class="category">火锅</span>
  <div class="scoreText">口味:4.8 环境:4.7 服务:4.9</div>
  <span class="addressText">工人体育场北路8号</span>
  <div class="desc-addr-txt">距地铁团结湖站500m</div>
  <span class="biz-txt">营业中</span>
  <span class="biz-time">10:00-次日07:00</span>
  <span class="feature-txt">可停车</span>
  <span class="feature-txt">有包厢</span>
  <div class="food">毛肚</div>
  <div class="food">虾滑</div>
</body></html>
"#;

#[test]
fn decode_rating_cases() {
    assert_eq!(decode_rating("star_45"), "4.5");
    assert_eq!(decode_rating("star star_50 star_sml"), "5.0");
    assert_eq!(decode_rating("star_0"), "0.0");
    assert_eq!(decode_rating(""), "0");
    assert_eq!(decode_rating("star"), "0");
    assert_eq!(decode_rating("star_abc"), "0");
    assert_eq!(decode_rating("star_99"), "0");
    assert_eq!(decode_rating("mystar_45x"), "0");
}

#[test]
fn decode_rating_is_stable() {
    for class in ["star_45", "star_30 big", "nothing"] {
        assert_eq!(decode_rating(class), decode_rating(class));
    }
}

#[test]
fn parse_shop_id_cases() {
    assert_eq!(
        parse_shop_id("https://www.dianping.com/shop/k3CUvpO8jhgs5f6X"),
        "k3CUvpO8jhgs5f6X"
    );
    assert_eq!(parse_shop_id("/shop/H1aBc2?from=list"), "H1aBc2");
    assert_eq!(parse_shop_id("/shop/H1aBc2/review_all"), "H1aBc2");
    assert_eq!(parse_shop_id("/shopping/xyz"), "");
    assert_eq!(parse_shop_id("/shop"), "");
    assert_eq!(parse_shop_id(""), "");
}

#[test]
fn ranking_reads_complete_item() {
    let items = extract_ranking(RANK_HTML, BASE);
    assert_eq!(items.len(), 3);

    let first = &items[0];
    assert_eq!(first.shop_id, "k3CUvpO8jhgs5f6X");
    assert_eq!(first.name, "海底捞火锅(三里屯店)");
    assert_eq!(first.rating, "4.5");
    assert_eq!(first.review_count, "12345");
    assert_eq!(first.price, "￥128");
    assert_eq!(first.address, "火锅 三里屯/工体");
    assert_eq!(first.img, "https://img.example/1.jpg");
    assert_eq!(first.url, "https://www.dianping.com/shop/k3CUvpO8jhgs5f6X");
    assert_eq!(first.recommend, vec!["毛肚", "虾滑"]);
}

#[test]
fn ranking_defaults_missing_fields() {
    let items = extract_ranking(RANK_HTML, BASE);

    let second = &items[1];
    assert_eq!(second.shop_id, "H1aBc2");
    assert_eq!(second.name, "小店");
    assert_eq!(second.rating, "5.0");
    assert_eq!(second.url, "https://www.dianping.com/shop/H1aBc2?from=list");
    assert_eq!(second.address, "");
    assert_eq!(second.price, "");
    assert!(second.recommend.is_empty());

    let third = &items[2];
    assert_eq!(third.shop_id, "");
    assert_eq!(third.name, "");
    assert_eq!(third.url, "");
    assert_eq!(third.rating, "0");
}

#[test]
fn ranking_ratings_match_expected_shape() {
    let re = Regex::new(r"^\d\.\d$|^0$").unwrap();
    for item in extract_ranking(RANK_HTML, BASE) {
        assert!(re.is_match(&item.rating), "bad rating {:?}", item.rating);
    }
}

#[test]
fn empty_container_yields_no_items() {
    let html = r#"<div class="shop-all-list"><ul></ul></div>"#;
    assert!(extract_ranking(html, BASE).is_empty());
}

#[test]
fn detail_reads_all_fields() {
    let d = extract_detail(DETAIL_HTML, "k3CUvpO8jhgs5f6X");
    assert_eq!(d.shop_id, "k3CUvpO8jhgs5f6X");
    assert_eq!(d.name, "海底捞火锅(三里屯店)");
    assert_eq!(d.rating, "4.8");
    assert_eq!(d.review_count, "12345条评价");
    assert_eq!(d.price, "人均:128元");
    assert_eq!(d.region, "三里屯");
    assert_eq!(d.category, "火锅");
    assert_eq!(d.score_text, "口味:4.8 环境:4.7 服务:4.9");
    assert_eq!(d.address, "工人体育场北路8号");
    assert_eq!(d.address_detail, "距地铁团结湖站500m");
    assert_eq!(d.business_hours, "营业中 10:00-次日07:00");
    assert_eq!(d.tags, vec!["可停车", "有包厢"]);
    assert_eq!(d.recommend_dishes, vec!["毛肚", "虾滑"]);
}

#[test]
fn detail_markdown_starts_with_name() {
    let d = extract_detail(DETAIL_HTML, "k3CUvpO8jhgs5f6X");
    assert_eq!(d.md.lines().next(), Some("# 海底捞火锅(三里屯店)"));
    assert!(d.md.contains("**评分**: 4.8 (12345条评价)  \n"));
    assert!(d.md.contains("**特色**: 可停车 有包厢\n"));
    assert!(d.md.ends_with("**推荐菜**:\n毛肚, 虾滑\n"));
}

#[test]
fn business_hours_needs_both_nodes() {
    let html = r#"<h1 class="shopName">A</h1><span class="biz-time">10:00-22:00</span>"#;
    let d = extract_detail(html, "x");
    assert_eq!(d.business_hours, "");
}

#[test]
fn detail_template_keeps_empty_slots() {
    let d = extract_detail("<html><body></body></html>", "x");
    assert_eq!(d.name, "");
    assert!(d.tags.is_empty());
    let expected = "# \n\n**评分**:  ()  \n**人均**:   \n**地区**:   \n**分类**:   \n**评分详情**: \n\n\
                    **地址**:   \n\n\n**营业信息**:   \n**特色**: \n\n**推荐菜**:\n\n";
    assert_eq!(d.md, expected);
}

#[test]
fn field_helper_reports_absence_separately_from_empty() {
    let doc = scraper::Html::parse_document(r#"<p class="a"></p>"#);
    let specs = [
        FieldSpec::new("a", ".a", Pick::Text),
        FieldSpec::new("b", ".b", Pick::Text),
        FieldSpec::new("bad", "::::", Pick::Text),
        FieldSpec::new("list", ".b", Pick::List),
    ];
    let table = FieldTable::new(&specs);
    assert_eq!(table.unparsed(), vec!["bad"]);
    let f = extract_fields(&doc.root_element(), &table);
    assert_eq!(f.found("a"), Some(""));
    assert_eq!(f.found("b"), None);
    assert_eq!(f.text("bad"), "");
    assert!(f.list("list").is_empty());
}

#[test]
fn detail_text_keeps_line_breaks_and_spacing() {
    let html = "<h1 class=\"shopName\">\n  海底捞\n</h1>\
                <div class=\"scoreText\">口味:4.8\n环境:4.7</div>\
                <div class=\"desc-addr-txt\">距地铁  500m</div>\
                <span class=\"biz-txt\">营业中</span>\
                <span class=\"biz-time\">周一至周五 10:00-22:00\n周末 09:00-23:00</span>";
    let d = extract_detail(html, "x");
    assert_eq!(d.name, "海底捞");
    assert_eq!(d.score_text, "口味:4.8\n环境:4.7");
    assert_eq!(d.address_detail, "距地铁  500m");
    assert_eq!(d.business_hours, "营业中 周一至周五 10:00-22:00\n周末 09:00-23:00");
    assert!(d.md.contains("**评分详情**: 口味:4.8\n环境:4.7\n"));
}

#[test]
fn page_field_tables_all_parse() {
    assert!(RANK_TABLE.unparsed().is_empty());
    assert!(DETAIL_TABLE.unparsed().is_empty());
}
